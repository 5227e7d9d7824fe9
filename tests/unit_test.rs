// Unit tests for userdesk
// These exercise the public filter, paging, store and keymap APIs.

#[cfg(test)]
mod search_tests {
    use userdesk::search::filter_by_email;
    use userdesk::store::User;

    fn user(id: u64, email: &str) -> User {
        User { id, name: format!("User {id}"), email: email.to_string() }
    }

    #[test]
    fn test_scenario_prefix_of_email() {
        let users = vec![user(1, "a@x.com"), user(2, "b@y.com")];
        let hits = filter_by_email(&users, "a@");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_every_hit_is_in_source_and_in_order() {
        let users: Vec<User> = (1..=30).map(|i| user(i, &format!("dev{}@corp{}.io", i % 7, i % 2))).collect();
        let hits = filter_by_email(&users, "corp1");
        assert!(hits.iter().all(|h| users.contains(h)));
        let ids: Vec<u64> = hits.iter().map(|u| u.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(hits.len(), 15);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let users = vec![user(1, "a@x.com")];
        assert!(filter_by_email(&users, "A@").is_empty());
    }
}

#[cfg(test)]
mod paging_tests {
    use userdesk::paging::{PAGE_SIZE, page_count, page_slice, page_window};

    #[test]
    fn test_page_size_is_five() {
        assert_eq!(PAGE_SIZE, 5);
    }

    #[test]
    fn test_seven_items() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(page_slice(&items, 1), &[1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&items, 2), &[6, 7]);
        assert!(page_slice(&items, 3).is_empty());
        assert_eq!(page_count(items.len()), 2);
    }

    #[test]
    fn test_window_bounds_are_ordered() {
        for len in 0..15 {
            for page in 0..6 {
                let w = page_window(len, page);
                assert!(w.start <= w.end && w.end <= len, "len {len} page {page}");
            }
        }
    }
}

#[cfg(test)]
mod store_tests {
    use std::sync::Arc;
    use std::time::Duration;
    use userdesk::StoreError;
    use userdesk::store::{MemoryBackend, NewUser, Store, User, UserStore};

    fn seeded() -> Store<MemoryBackend> {
        Store::new(MemoryBackend::from_users(vec![
            User { id: 1, name: "Ann".into(), email: "ann@x.com".into() },
            User { id: 2, name: "Bob".into(), email: "bob@y.com".into() },
        ]))
    }

    fn settle(rx: &std::sync::mpsc::Receiver<userdesk::store::StoreState>, n: usize) {
        for _ in 0..n {
            rx.recv_timeout(Duration::from_secs(5)).expect("notification");
        }
    }

    #[test]
    fn test_delete_publishes_new_collection_without_id() {
        let store = seeded();
        let rx = store.subscribe();
        store.fetch_users();
        settle(&rx, 2);
        let before = store.state().users;

        store.delete_user(2);
        let after = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!Arc::ptr_eq(&before, &after.users));
        assert_eq!(after.users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_delete_of_unknown_id_reports_error() {
        let store = seeded();
        let rx = store.subscribe();
        store.delete_user(99);
        let state = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(state.error, Some(StoreError::NotFound(99).to_string()));
        assert!(state.users.is_empty());
    }

    #[test]
    fn test_add_appends_created_user() {
        let store = seeded();
        let rx = store.subscribe();
        store.add_user(NewUser::new("Cy", "cy@z.com"));
        let state = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let added = state.users.last().cloned().unwrap();
        assert_eq!(added, User { id: 3, name: "Cy".into(), email: "cy@z.com".into() });
    }

    #[test]
    fn test_dropped_subscriber_does_not_block_others() {
        let store = seeded();
        drop(store.subscribe());
        let rx = store.subscribe();
        store.fetch_users();
        settle(&rx, 2);
        assert_eq!(store.state().users.len(), 2);
    }
}

#[cfg(test)]
mod keymap_tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use userdesk::app::keymap::{KeyAction, Keymap};

    #[test]
    fn test_default_bindings() {
        let km = Keymap::default();
        let cases = [
            (KeyCode::Char('q'), KeyAction::Quit),
            (KeyCode::Char('/'), KeyAction::StartSearch),
            (KeyCode::Char('n'), KeyAction::NewUser),
            (KeyCode::Delete, KeyAction::DeleteSelection),
            (KeyCode::Char('b'), KeyAction::ToggleSidebar),
            (KeyCode::Left, KeyAction::PrevPage),
            (KeyCode::Right, KeyAction::NextPage),
            (KeyCode::Home, KeyAction::FirstPage),
            (KeyCode::End, KeyAction::LastPage),
        ];
        for (code, action) in cases {
            assert_eq!(km.resolve(&KeyEvent::new(code, KeyModifiers::NONE)), Some(action), "{code:?}");
        }
    }

    #[test]
    fn test_format_key() {
        assert_eq!(Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('q')), "Ctrl+q");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::PageDown), "PageDown");
    }
}
