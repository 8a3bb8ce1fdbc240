use actix_web::web;
use std::sync::Arc;

use crate::activity::application::ports::outgoing::ActivityLogger;
use crate::activity::application::services::ActivityRecorder;
use crate::editor::application::ports::incoming::use_cases::AttachImageUseCase;
use crate::editor::application::EditorUseCases;
use crate::export::application::ports::incoming::use_cases::ExportPostsUseCase;
use crate::export::application::ExportUseCases;
use crate::media::application::ports::incoming::use_cases::ReplaceThumbnailUseCase;
use crate::media::application::MediaUseCases;
use crate::shared_image::application::ports::incoming::use_cases::AddSharedImageUseCase;
use crate::shared_image::application::ports::outgoing::EntityLookup;
use crate::shared_image::application::services::{
    AddSharedImageService, AttachTemporaryImagesService, DeactivateSharedImageService,
    ListSharedImagesService, UpdateCaptionService,
};
use crate::shared_image::application::SharedImageUseCases;
use crate::tests::support::in_memory_store::InMemorySharedImageStore;
use crate::tests::support::stubs::*;
use crate::AppState;

/// App state for route tests.
///
/// The shared image library runs the real services over an in-memory store;
/// everything else is a stub until replaced with a `with_*` call.
pub struct TestAppStateBuilder {
    store: InMemorySharedImageStore,
    entity_lookup: Arc<dyn EntityLookup + Send + Sync>,
    replace_thumbnail: Arc<dyn ReplaceThumbnailUseCase + Send + Sync>,
    attach_image: Arc<dyn AttachImageUseCase + Send + Sync>,
    export_posts: Arc<dyn ExportPostsUseCase + Send + Sync>,
    activity_logger: Arc<dyn ActivityLogger + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            store: InMemorySharedImageStore::new(),
            entity_lookup: Arc::new(StubEntityLookup::default()),
            replace_thumbnail: Arc::new(StubReplaceThumbnail),
            attach_image: Arc::new(StubAttachImage),
            export_posts: Arc::new(StubExportPosts),
            activity_logger: Arc::new(RecordingActivityLogger::default()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_shared_image_store(mut self, store: InMemorySharedImageStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_entity_lookup(mut self, lookup: Arc<dyn EntityLookup + Send + Sync>) -> Self {
        self.entity_lookup = lookup;
        self
    }

    pub fn with_replace_thumbnail(
        mut self,
        uc: Arc<dyn ReplaceThumbnailUseCase + Send + Sync>,
    ) -> Self {
        self.replace_thumbnail = uc;
        self
    }

    pub fn with_attach_image(mut self, uc: Arc<dyn AttachImageUseCase + Send + Sync>) -> Self {
        self.attach_image = uc;
        self
    }

    pub fn with_export_posts(mut self, uc: Arc<dyn ExportPostsUseCase + Send + Sync>) -> Self {
        self.export_posts = uc;
        self
    }

    pub fn with_activity_logger(mut self, logger: Arc<dyn ActivityLogger + Send + Sync>) -> Self {
        self.activity_logger = logger;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let add: Arc<dyn AddSharedImageUseCase + Send + Sync> =
            Arc::new(AddSharedImageService::new(self.store.clone()));

        web::Data::new(AppState {
            shared_image: SharedImageUseCases {
                add: add.clone(),
                list: Arc::new(ListSharedImagesService::new(
                    Arc::new(self.store.clone()),
                    self.entity_lookup,
                )),
                deactivate: Arc::new(DeactivateSharedImageService::new(self.store)),
                update_caption: Arc::new(UpdateCaptionService::new()),
                attach_temporary: Arc::new(AttachTemporaryImagesService::new(add)),
            },
            media: MediaUseCases {
                replace_thumbnail: self.replace_thumbnail,
            },
            editor: EditorUseCases {
                attach_image: self.attach_image,
            },
            export: ExportUseCases {
                export_posts: self.export_posts,
            },
            activity: ActivityRecorder::new(self.activity_logger),
        })
    }
}
