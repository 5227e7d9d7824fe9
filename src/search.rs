use crate::store::User;

/// Keep the records whose email contains `query`, in source order.
///
/// The match is case-sensitive and unanchored; an empty query keeps everything.
pub fn filter_by_email(users: &[User], query: &str) -> Vec<User> {
    if query.is_empty() {
        return users.to_vec();
    }
    users.iter().filter(|u| u.email.contains(query)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_user(id: u64, email: &str) -> User {
        User { id, name: format!("user{id}"), email: email.to_string() }
    }

    #[test]
    fn filters_on_email_substring() {
        let users = vec![mk_user(1, "a@x.com"), mk_user(2, "b@y.com")];
        let hits = filter_by_email(&users, "a@");
        assert_eq!(hits, vec![mk_user(1, "a@x.com")]);
    }

    #[test]
    fn match_is_case_sensitive_and_ignores_name() {
        let users = vec![mk_user(1, "Ann@x.com"), mk_user(2, "ann@y.com")];
        assert_eq!(filter_by_email(&users, "ann").len(), 1);
        assert!(filter_by_email(&users, "user1").is_empty());
    }

    #[test]
    fn empty_query_keeps_source_order() {
        let users = vec![mk_user(3, "c@z"), mk_user(1, "a@x"), mk_user(2, "b@y")];
        assert_eq!(filter_by_email(&users, ""), users);
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let users: Vec<User> = (1..=20).map(|i| mk_user(i, &format!("m{}@d{}.org", i % 4, i % 3))).collect();
        for q in ["", "m1", "@d2", ".org", "zzz"] {
            let once = filter_by_email(&users, q);
            assert_eq!(filter_by_email(&once, q), once, "query {q:?}");
        }
    }
}
