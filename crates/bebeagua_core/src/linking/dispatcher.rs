//! Deep-link dispatch: URL events in, actions and navigation out.
//!
//! # Responsibility
//! - Subscribe to "URL opened" events for the dispatcher lifetime.
//! - Probe the launch URL once at mount.
//! - Route both through one synchronous handler.
//!
//! # Invariants
//! - The event subscription is released exactly once on teardown.
//! - `action=add-glass` dispatches one `AddGlass` and one navigation to
//!   [`DEFAULT_ROUTE`], ignoring the decoded route.
//! - No queueing or deduplication: a launch URL that is also re-delivered as
//!   an event is handled twice.

use super::codec::{decode_with, StandardUrlParser, UrlParser};
use super::route::DEFAULT_ROUTE;
use crate::state::{ActionSink, HydrationAction};
use log::{debug, info};
use std::rc::Rc;

/// Query parameter carrying in-place commands.
pub const ACTION_PARAM: &str = "action";
/// Command value: add one glass, then show home.
pub const ACTION_ADD_GLASS: &str = "add-glass";

/// Navigation capability exposed by the UI shell.
pub trait Navigator {
    fn navigate(&self, route: &str);

    fn replace(&self, route: &str) {
        self.navigate(route);
    }
}

impl<T: Navigator + ?Sized> Navigator for Rc<T> {
    fn navigate(&self, route: &str) {
        (**self).navigate(route)
    }

    fn replace(&self, route: &str) {
        (**self).replace(route)
    }
}

pub type UrlListener = Box<dyn Fn(&str)>;

/// Source of incoming URLs (OS linking bridge).
pub trait LinkSource {
    /// Registers `listener` for every subsequent "URL opened" event.
    fn subscribe(&self, listener: UrlListener) -> Subscription;
    /// URL the app was launched with, if any.
    fn initial_url(&self) -> Option<String>;
}

/// Releasable event subscription. Release runs at most once.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Releases the subscription now.
    pub fn remove(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_once();
    }
}

/// Result of handling one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// URL could not be decoded.
    Ignored,
    /// `add-glass` command ran; navigated to `route`.
    AddedGlass { route: String },
    /// Navigated to the decoded route.
    Navigated { route: String },
}

/// Synchronous URL handler shared by the event and launch paths.
pub struct DeepLinkHandler {
    parser: Box<dyn UrlParser>,
    actions: Rc<dyn ActionSink>,
    navigator: Rc<dyn Navigator>,
}

impl DeepLinkHandler {
    pub fn new(actions: Rc<dyn ActionSink>, navigator: Rc<dyn Navigator>) -> Self {
        Self::with_parser(Box::new(StandardUrlParser), actions, navigator)
    }

    pub fn with_parser(
        parser: Box<dyn UrlParser>,
        actions: Rc<dyn ActionSink>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            parser,
            actions,
            navigator,
        }
    }

    /// Handles one URL. Never fails; undecodable input is a no-op.
    pub fn handle_url(&self, url: &str) -> LinkOutcome {
        let Some(link) = decode_with(self.parser.as_ref(), url) else {
            debug!("event=deep_link_handle module=linking status=ignored");
            return LinkOutcome::Ignored;
        };

        if link.params.get(ACTION_PARAM).map(String::as_str) == Some(ACTION_ADD_GLASS) {
            self.actions.dispatch(HydrationAction::AddGlass.into());
            self.navigator.navigate(DEFAULT_ROUTE);
            info!(
                "event=deep_link_handle module=linking status=ok action={} route={}",
                ACTION_ADD_GLASS, DEFAULT_ROUTE
            );
            return LinkOutcome::AddedGlass {
                route: DEFAULT_ROUTE.to_string(),
            };
        }

        self.navigator.navigate(&link.route);
        info!(
            "event=deep_link_handle module=linking status=ok action=navigate route={}",
            link.route
        );
        LinkOutcome::Navigated { route: link.route }
    }
}

/// Mounted dispatcher. Dropping or unmounting releases the event
/// subscription.
pub struct DeepLinkDispatcher {
    handler: Rc<DeepLinkHandler>,
    subscription: Option<Subscription>,
}

impl DeepLinkDispatcher {
    /// Subscribes to `source`, then handles the launch URL if present.
    pub fn mount(source: &dyn LinkSource, handler: Rc<DeepLinkHandler>) -> Self {
        let listener_handler = Rc::clone(&handler);
        let subscription = source.subscribe(Box::new(move |url: &str| {
            listener_handler.handle_url(url);
        }));
        info!("event=deep_link_mount module=linking status=ok");

        if let Some(url) = source.initial_url() {
            debug!("event=deep_link_initial module=linking status=found");
            handler.handle_url(&url);
        }

        Self {
            handler,
            subscription: Some(subscription),
        }
    }

    pub fn handler(&self) -> &DeepLinkHandler {
        &self.handler
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Releases the event subscription.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.remove();
            info!("event=deep_link_unmount module=linking status=ok");
        }
    }
}

impl Drop for DeepLinkDispatcher {
    fn drop(&mut self) {
        self.release();
    }
}
