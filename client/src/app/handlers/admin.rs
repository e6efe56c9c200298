//! Admin user listing.

use shared::User;

use crate::app::events::{AppEvent, Outcome};
use crate::app::status::Op;
use crate::app::Store;

impl Store {
    pub fn fetch_users(&self) {
        let generation = self.state.write().admin.status.begin(Op::FetchUsers);
        let api = self.api.clone();
        self.spawn_request(generation, async move { api.users().await }, AppEvent::UsersResult);
    }

    pub(crate) fn on_users(&self, outcome: Outcome<Vec<User>>) {
        let mut state = self.state.write();
        if let Some(users) = state.admin.status.resolve(Op::FetchUsers, outcome) {
            state.admin.users = users;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests_support::{offline_store, user};

    #[test]
    fn test_user_list_is_stored() {
        let (store, _) = offline_store();
        let generation = store.state.write().admin.status.begin(Op::FetchUsers);
        let mut other = user();
        other.id = "u2".to_string();
        store.handle_event(AppEvent::UsersResult(Outcome::new(generation, Ok(vec![user(), other]))));

        let state = store.state.read();
        assert_eq!(state.admin.users.len(), 2);
        assert_eq!(state.admin.users[1].id, "u2");
    }
}
