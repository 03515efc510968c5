//! Completion of a write.

use crate::api::Mutation;
use crate::domain::Record;
use crate::error::ApiResult;
use crate::notice::Notice;
use crate::query::QueryCache;

/// Apply a finished write to the cache and describe it for the toast.
/// Only success invalidates; a failed write leaves cached lists as they were.
pub fn settle(
    cache: &mut QueryCache,
    mutation: &Mutation,
    result: &ApiResult<Option<Record>>,
) -> Notice {
    match result {
        Ok(_) => {
            cache.invalidate(mutation.resource());
            Notice::success(mutation.success_message())
        }
        Err(err) => {
            let verb = if mutation.is_delete() { "delete" } else { "save" };
            log::warn!("{} {} failed: {}", mutation.kind().label(), verb, err);
            Notice::error(err.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{Failure, MemoryBackend};
    use crate::api::ApiClient;
    use crate::domain::{RecordKind, Resource};
    use crate::forms::FormState;
    use crate::notice::NoticeLevel;
    use crate::query::PagedList;
    use serde_json::json;

    fn seeded(n: usize) -> ApiClient<MemoryBackend> {
        let backend = MemoryBackend::new();
        backend.seed(
            Resource::Plans,
            (1..=n)
                .map(|i| json!({ "id": format!("p{i}"), "nombre": format!("Plan {i}") }))
                .collect(),
        );
        ApiClient::new(backend)
    }

    /// Load (or reload) the list the way a screen does
    async fn render(
        client: &ApiClient<MemoryBackend>,
        list: &mut PagedList<Record>,
        cache: &mut QueryCache,
        page: u32,
    ) {
        if let Some(ticket) = list.show(page, cache) {
            let result = client.list_records(RecordKind::Plan, ticket.request).await;
            list.resolve(ticket, result, cache);
        }
    }

    #[tokio::test]
    async fn test_create_flow_invalidates_and_refetches() {
        let client = seeded(2);
        let mut cache = QueryCache::new();
        let mut list = PagedList::new(Resource::Plans, 5);
        render(&client, &mut list, &mut cache, 1).await;
        assert_eq!(list.rows().len(), 2);

        let mut form = FormState::create(RecordKind::Plan);
        form.set_text("nombre", "Plan 3");
        let mutation = form.begin_submit().unwrap();
        let result = client.execute(&mutation).await;
        form.finish(&result);
        let notice = settle(&mut cache, &mutation, &result);

        assert_eq!(notice, Notice::success("Plan created successfully."));
        assert!(!cache.is_fresh(&list.key()));
        assert_eq!(form.text("nombre"), "");

        render(&client, &mut list, &mut cache, 1).await;
        assert_eq!(list.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_rejected_create_sends_one_request_and_keeps_cache() {
        let client = seeded(1);
        let mut cache = QueryCache::new();
        let mut list = PagedList::new(Resource::Plans, 5);
        render(&client, &mut list, &mut cache, 1).await;
        let before = client.transport().requests().len();

        let mut form = FormState::create(RecordKind::Plan);
        form.set_text("nombre", "Duplicado");
        let duplicate = "The plan with this name already exists in the system.";
        client
            .transport()
            .fail_next(Failure::Status(400, json!({ "detail": duplicate }).to_string()));
        let mutation = form.begin_submit().unwrap();
        let result = client.execute(&mutation).await;
        form.finish(&result);
        let notice = settle(&mut cache, &mutation, &result);

        assert_eq!(client.transport().requests().len(), before + 1);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "The plan with this name already exists in the system.");
        assert_eq!(form.text("nombre"), "Duplicado");
        assert!(cache.is_fresh(&list.key()));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_row_count() {
        let client = seeded(3);
        let mut cache = QueryCache::new();
        let mut list = PagedList::new(Resource::Plans, 5);
        render(&client, &mut list, &mut cache, 1).await;

        client.transport().fail_next(Failure::Offline);
        let delete = Mutation::Delete { kind: RecordKind::Plan, id: "p2".into() };
        let result = client.execute(&delete).await;
        let notice = settle(&mut cache, &delete, &result);
        assert_eq!(notice.level, NoticeLevel::Error);

        render(&client, &mut list, &mut cache, 1).await;
        assert_eq!(list.rows().len(), 3);
        assert_eq!(client.transport().rows(Resource::Plans).len(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_row_after_refetch() {
        let client = seeded(6);
        let mut cache = QueryCache::new();
        let mut list = PagedList::new(Resource::Plans, 5);
        render(&client, &mut list, &mut cache, 2).await;
        assert_eq!(list.rows().len(), 1);

        let delete = Mutation::Delete { kind: RecordKind::Plan, id: "p6".into() };
        let result = client.execute(&delete).await;
        let notice = settle(&mut cache, &delete, &result);
        assert_eq!(notice.message, "The plan was deleted successfully.");

        render(&client, &mut list, &mut cache, 2).await;
        assert!(list.rows().is_empty());
        assert!(cache.is_fresh(&list.key()));

        // Page 2 no longer exists: the screen moves back to the last real page
        let page = list.fallback_page().unwrap();
        assert_eq!(page, 1);
        render(&client, &mut list, &mut cache, page).await;
        assert_eq!(list.rows().len(), 5);
        assert_eq!(list.fallback_page(), None);
    }
}
