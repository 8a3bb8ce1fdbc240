pub mod blog_post_translations;
pub mod blog_posts;
pub mod portfolio_project_translations;
pub mod portfolio_projects;
pub mod shared_images;
