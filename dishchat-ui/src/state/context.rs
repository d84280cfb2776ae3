//! App Context
//!
//! One `RecipeAssistant` per page, shared with every component through
//! Leptos context. Its view state is mirrored into an `RwSignal` so the
//! templates re-render on every change.

use leptos::html::Video;
use leptos::*;
use std::future::Future;
use std::rc::Rc;

use dishchat::{CaptureSettings, RecipeAssistant, ViewState};

use crate::api::{backend_base_url, GlooBackend};
use crate::media::{BrowserCamera, ObjectUrlPreviews};

pub type BrowserAssistant = RecipeAssistant<GlooBackend, BrowserCamera, ObjectUrlPreviews>;

/// Shared page state
#[derive(Clone)]
pub struct AppContext {
    pub assistant: Rc<BrowserAssistant>,
    /// Mirror of the assistant's view state
    pub view: RwSignal<ViewState>,
    /// `<video>` element the camera renders into
    pub video: NodeRef<Video>,
}

impl AppContext {
    /// Run an assistant action in the background.
    pub fn run<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<BrowserAssistant>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let assistant = Rc::clone(&self.assistant);
        spawn_local(action(assistant));
    }
}

/// Create the assistant, mirror its state and provide it to the tree.
pub fn provide_app_context() -> AppContext {
    let video = create_node_ref::<Video>();
    let assistant = Rc::new(RecipeAssistant::new(
        GlooBackend::new(&backend_base_url()),
        BrowserCamera::new(video),
        ObjectUrlPreviews,
        CaptureSettings::default(),
    ));

    let view = create_rw_signal(assistant.state().snapshot());
    let subscription = assistant.state().subscribe(move |state| view.set(state.clone()));

    // Page teardown: stop the camera and revoke the preview
    let on_unmount = Rc::clone(&assistant);
    on_cleanup(move || {
        on_unmount.state().unsubscribe(subscription);
        on_unmount.teardown();
    });

    log::info!("recipe assistant ready, backend at {}", backend_base_url());

    let context = AppContext {
        assistant,
        view,
        video,
    };
    provide_context(context.clone());
    context
}

/// Fetch the app context provided by `App`
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}
