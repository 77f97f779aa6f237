use pigeon::core::action::{Action, Effect, update};
use pigeon::core::session;
use pigeon::core::state::App;
use pigeon::core::{ConversationStore, SharedStore, StoreEvent, User, UserDirectory};

// ============================================================================
// Helper Functions
// ============================================================================

fn directory() -> UserDirectory {
    UserDirectory::generate(5, Some(2024))
}

fn contents(store: &ConversationStore, user: &User) -> Vec<String> {
    store
        .conversation(user.id)
        .map(|c| c.messages.iter().map(|m| m.content.clone()).collect())
        .unwrap_or_default()
}

// ============================================================================
// Store Scenarios
// ============================================================================

#[test]
fn test_two_users_scenario_through_public_api() {
    let directory = directory();
    let a = &directory.users()[0];
    let b = &directory.users()[1];
    let mut store = ConversationStore::new();

    assert!(store.start_conversation(a).created);
    assert_eq!(store.len(), 1);

    store.send_message(a, "hi");
    assert_eq!(contents(&store, a), vec!["hi"]);

    assert!(store.send_message(b, "yo").is_none());
    assert_eq!(store.len(), 1);
    assert!(!store.has_conversation(b.id));

    store.start_conversation(b);
    store.send_message(b, "yo");
    assert_eq!(store.len(), 2);
    assert_eq!(contents(&store, b), vec!["yo"]);
    assert_eq!(store.conversation(b.id).unwrap().messages[0].recipient, b.id);
}

#[test]
fn test_every_directory_user_gets_one_conversation() {
    let directory = directory();
    let mut store = ConversationStore::new();
    for _ in 0..3 {
        for user in &directory {
            store.start_conversation(user);
        }
    }

    let started: Vec<_> = store.conversations().iter().map(|c| c.id()).collect();
    let expected: Vec<_> = directory.iter().map(|u| u.id).collect();
    assert_eq!(started, expected);
}

#[test]
fn test_subscriber_sees_each_change_once() {
    let directory = directory();
    let user = &directory.users()[3];
    let mut store = ConversationStore::new();
    let events = store.subscribe();

    store.start_conversation(user);
    store.send_message(user, "<script>alert(1)</script>");

    let seen: Vec<_> = events.try_iter().collect();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], StoreEvent::MessageAppended { user: user.id, index: 0 });
    assert_eq!(contents(&store, user), vec!["<script>alert(1)</script>"]);
}

#[test]
fn test_shared_store_from_many_threads() {
    let directory = directory();
    let shared = SharedStore::new(ConversationStore::new());
    let target = directory.users()[0].clone();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            let target = target.clone();
            std::thread::spawn(move || {
                let created = shared.start_conversation(&target);
                for i in 0..25 {
                    shared.send_message(&target, format!("{t}-{i}"));
                }
                created
            })
        })
        .collect();
    let created: usize = handles
        .into_iter()
        .map(|h| h.join().unwrap() as usize)
        .sum();

    assert_eq!(created, 1);
    let snapshot = shared.snapshot();
    assert_eq!(snapshot.conversations.len(), 1);
    assert_eq!(snapshot.conversations[0].messages.len(), 100);
    assert_eq!(snapshot.revision, 101);
}

// ============================================================================
// Reducer + Snapshot
// ============================================================================

#[test]
fn test_reducer_session_survives_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let mut app = App::new(directory(), ConversationStore::new());
    let id = app.directory.users()[4].id;
    assert!(matches!(
        update(&mut app, Action::StartConversation(id)),
        Effect::Notify(_)
    ));
    update(
        &mut app,
        Action::SendMessage {
            user: id,
            content: String::new(),
        },
    );
    session::save(&path, &session::capture(&app.directory, &app.store)).unwrap();

    let snapshot = session::load(&path).unwrap().unwrap();
    let (directory, store) = session::restore(snapshot).unwrap();
    assert_eq!(directory.users(), app.directory.users());
    let user = directory.get(id).unwrap();
    assert_eq!(contents(&store, user), vec![""]);
}
