use bebeagua_core::linking::{
    DeepLinkDispatcher, DeepLinkHandler, LinkOutcome, LinkSource, Navigator, Subscription,
};
use bebeagua_core::{ActionSink, AppAction, AppStore, HydrationAction};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener = Box<dyn Fn(&str)>;

/// Scriptable link source standing in for the OS linking bridge.
#[derive(Default)]
struct FakeLinkSource {
    listener: Rc<RefCell<Option<Listener>>>,
    initial: Option<String>,
    releases: Rc<Cell<usize>>,
}

impl FakeLinkSource {
    fn with_initial(url: &str) -> Self {
        Self {
            initial: Some(url.to_string()),
            ..Self::default()
        }
    }

    fn emit(&self, url: &str) {
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(url);
        }
    }

    fn release_count(&self) -> usize {
        self.releases.get()
    }

    fn has_listener(&self) -> bool {
        self.listener.borrow().is_some()
    }
}

impl LinkSource for FakeLinkSource {
    fn subscribe(&self, listener: Listener) -> Subscription {
        *self.listener.borrow_mut() = Some(listener);
        let slot = Rc::clone(&self.listener);
        let releases = Rc::clone(&self.releases);
        Subscription::new(move || {
            releases.set(releases.get() + 1);
            slot.borrow_mut().take();
        })
    }

    fn initial_url(&self) -> Option<String> {
        self.initial.clone()
    }
}

#[derive(Default)]
struct RecordingNavigator {
    routes: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.borrow_mut().push(route.to_string());
    }
}

#[derive(Default)]
struct RecordingSink {
    actions: RefCell<Vec<AppAction>>,
}

impl ActionSink for RecordingSink {
    fn dispatch(&self, action: AppAction) {
        self.actions.borrow_mut().push(action);
    }
}

fn handler(
    sink: &Rc<RecordingSink>,
    navigator: &Rc<RecordingNavigator>,
) -> Rc<DeepLinkHandler> {
    Rc::new(DeepLinkHandler::new(
        Rc::clone(sink) as Rc<dyn ActionSink>,
        Rc::clone(navigator) as Rc<dyn Navigator>,
    ))
}

#[test]
fn add_glass_action_increments_once_and_navigates_home() {
    let sink = Rc::new(RecordingSink::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let handler = handler(&sink, &navigator);

    let outcome = handler.handle_url("bebeagua://stats?action=add-glass");

    assert_eq!(
        outcome,
        LinkOutcome::AddedGlass {
            route: "/(tabs)".to_string()
        }
    );
    assert_eq!(
        *sink.actions.borrow(),
        vec![AppAction::Hydration(HydrationAction::AddGlass)]
    );
    assert_eq!(*navigator.routes.borrow(), vec!["/(tabs)".to_string()]);
}

#[test]
fn plain_link_navigates_without_actions() {
    let sink = Rc::new(RecordingSink::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let handler = handler(&sink, &navigator);

    handler.handle_url("bebeagua://config?tab=profile");
    handler.handle_url("bebeagua://home?action=other");

    assert!(sink.actions.borrow().is_empty());
    assert_eq!(
        *navigator.routes.borrow(),
        vec!["/(tabs)/configuration".to_string(), "/(tabs)".to_string()]
    );
}

#[test]
fn undecodable_link_is_silently_ignored() {
    let sink = Rc::new(RecordingSink::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let handler = handler(&sink, &navigator);

    assert_eq!(handler.handle_url("not a url"), LinkOutcome::Ignored);
    assert!(sink.actions.borrow().is_empty());
    assert!(navigator.routes.borrow().is_empty());
}

#[test]
fn events_are_handled_in_order_without_dedup() {
    let source = FakeLinkSource::default();
    let sink = Rc::new(RecordingSink::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let dispatcher = DeepLinkDispatcher::mount(&source, handler(&sink, &navigator));

    source.emit("bebeagua://stats");
    source.emit("bebeagua://stats");
    source.emit("bebeagua://welcome");

    assert_eq!(
        *navigator.routes.borrow(),
        vec![
            "/(tabs)/stats".to_string(),
            "/(tabs)/stats".to_string(),
            "/welcome".to_string()
        ]
    );
    drop(dispatcher);
}

#[test]
fn initial_url_is_handled_at_mount() {
    let source = FakeLinkSource::with_initial("bebeagua://home?action=add-glass");
    let store = Rc::new(AppStore::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let handler = Rc::new(DeepLinkHandler::new(
        Rc::clone(&store) as Rc<dyn ActionSink>,
        Rc::clone(&navigator) as Rc<dyn Navigator>,
    ));

    let _dispatcher = DeepLinkDispatcher::mount(&source, handler);

    assert_eq!(store.state().water.glasses, 1);
    assert_eq!(*navigator.routes.borrow(), vec!["/(tabs)".to_string()]);
}

// Known race: a launch URL re-delivered as the first event is processed
// twice. Nothing deduplicates the two paths.
#[test]
fn launch_url_redelivered_as_event_is_handled_twice() {
    let url = "bebeagua://home?action=add-glass";
    let source = FakeLinkSource::with_initial(url);
    let store = Rc::new(AppStore::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let handler = Rc::new(DeepLinkHandler::new(
        Rc::clone(&store) as Rc<dyn ActionSink>,
        Rc::clone(&navigator) as Rc<dyn Navigator>,
    ));

    let _dispatcher = DeepLinkDispatcher::mount(&source, handler);
    source.emit(url);

    assert_eq!(store.state().water.glasses, 2);
    assert_eq!(navigator.routes.borrow().len(), 2);
}

#[test]
fn unmount_releases_subscription_once_without_any_link() {
    let source = FakeLinkSource::default();
    let sink = Rc::new(RecordingSink::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let dispatcher = DeepLinkDispatcher::mount(&source, handler(&sink, &navigator));

    assert!(dispatcher.is_mounted());
    assert!(source.has_listener());
    assert_eq!(source.release_count(), 0);

    dispatcher.unmount();

    assert_eq!(source.release_count(), 1);
    assert!(!source.has_listener());
    assert!(navigator.routes.borrow().is_empty());
}

#[test]
fn dropping_dispatcher_releases_subscription_once() {
    let source = FakeLinkSource::default();
    let sink = Rc::new(RecordingSink::default());
    let navigator = Rc::new(RecordingNavigator::default());
    {
        let _dispatcher = DeepLinkDispatcher::mount(&source, handler(&sink, &navigator));
        source.emit("bebeagua://stats");
    }
    assert_eq!(source.release_count(), 1);

    source.emit("bebeagua://welcome");
    assert_eq!(*navigator.routes.borrow(), vec!["/(tabs)/stats".to_string()]);
}
