use mocks::{new_todo_strategy, MockTodoRepository};
use proptest::prelude::*;
use std::sync::Arc;
use todo_api::TodoHandler;
use tokio::runtime::Runtime;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_create_then_get_round_trips(input in new_todo_strategy()) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let handler = TodoHandler::new(Arc::new(MockTodoRepository::new()));

            let created = handler.create_todo(input.clone()).await.unwrap();
            let fetched = handler.get_todo(created.id).await.unwrap();

            prop_assert_eq!(&fetched, &created);
            prop_assert_eq!(&fetched.title, &input.title);
            prop_assert_eq!(
                fetched.description.as_deref(),
                input.description.as_deref().filter(|d| !d.is_empty())
            );
            prop_assert!(!fetched.completed);
            prop_assert_eq!(&fetched.created_at, &fetched.updated_at);
            Ok(())
        })?;
    }

    #[test]
    fn prop_double_toggle_restores_state(input in new_todo_strategy()) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let handler = TodoHandler::new(Arc::new(MockTodoRepository::new()));
            let created = handler.create_todo(input).await.unwrap();

            let once = handler.toggle_todo(created.id).await.unwrap();
            let twice = handler.toggle_todo(created.id).await.unwrap();

            prop_assert!(once.completed);
            prop_assert!(!twice.completed);
            Ok(())
        })?;
    }
}
