//! Search Module Tests
//!
//! Validates duplicate detection and prefix search over a record directory.
//!
//! ## Test Scopes
//! - **Matcher**: Case folding, exact pair comparison and prefix filtering.
//! - **Scanner**: Full-directory scans, empty stores and fatal parse failures.

#[cfg(test)]
mod tests {
    use crate::error::RecordError;
    use crate::search::matcher::{NameFilter, NamePair};
    use crate::search::scanner::{RecordCursor, find_duplicate, search};
    use crate::storage::store::RecordStore;
    use crate::storage::types::{RecordId, StudentRecord};
    use std::collections::HashSet;
    use tempfile::{TempDir, tempdir};

    fn student(id: u64, first: &str, last: &str) -> StudentRecord {
        StudentRecord {
            record_id: RecordId(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            gpa: Some(3.0),
            enrolled: false,
        }
    }

    async fn seeded_store(records: &[StudentRecord]) -> (TempDir, RecordStore) {
        let dir = tempdir().unwrap();
        let store = RecordStore::open(dir.path()).await.unwrap();
        for record in records {
            store.write(record).await.unwrap();
        }
        (dir, store)
    }

    fn ids(records: &[StudentRecord]) -> HashSet<u64> {
        records.iter().map(|r| r.record_id.0).collect()
    }

    // ============================================================
    // MATCHER TESTS
    // ============================================================

    #[test]
    fn test_name_pair_ignores_case() {
        let pair = NamePair::new("ANN", "lee");

        assert!(pair.matches(&student(1, "Ann", "Lee")));
        assert!(pair.matches(&student(2, "ann", "LEE")));
        assert!(!pair.matches(&student(3, "Ann", "Leeds")));
        assert!(!pair.matches(&student(4, "Anne", "Lee")));
    }

    #[test]
    fn test_name_pair_folds_non_ascii() {
        let pair = NamePair::new("ÉMILE", "ZOLA");

        assert!(pair.matches(&student(1, "émile", "Zola")));
    }

    #[test]
    fn test_filter_prefix_is_case_insensitive() {
        let filter = NameFilter::new(Some("an"), None);

        assert!(filter.matches(&student(1, "Ann", "Lee")));
        assert!(filter.matches(&student(2, "ANDREW", "Ray")));
        assert!(!filter.matches(&student(3, "Joan", "Lee")));
    }

    #[test]
    fn test_filter_requires_both_prefixes() {
        let filter = NameFilter::new(Some("a"), Some("l"));

        assert!(filter.matches(&student(1, "Ann", "Lee")));
        assert!(!filter.matches(&student(2, "Ann", "Ray")));
        assert!(!filter.matches(&student(3, "Bob", "Lee")));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let absent = NameFilter::new(None, None);
        let blank = NameFilter::new(Some(""), Some(""));

        assert!(absent.is_empty());
        assert!(blank.is_empty());
        assert_eq!(absent, blank);
        assert!(absent.matches(&student(1, "Ann", "Lee")));
        assert!(absent.matches(&student(2, "", "")));
    }

    // ============================================================
    // DUPLICATE DETECTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_find_duplicate_in_empty_store() {
        let (_dir, store) = seeded_store(&[]).await;

        let found = find_duplicate(&store, "Ann", "Lee").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_duplicate_case_insensitive() {
        let (_dir, store) =
            seeded_store(&[student(1, "Bob", "Ray"), student(2, "Ann", "Lee")]).await;

        let found = find_duplicate(&store, "aNN", "LEE").await.unwrap();

        assert_eq!(found.unwrap().record_id, RecordId(2));
    }

    #[tokio::test]
    async fn test_find_duplicate_requires_both_names() {
        let (_dir, store) =
            seeded_store(&[student(1, "Ann", "Ray"), student(2, "Bob", "Lee")]).await;

        let found = find_duplicate(&store, "Ann", "Lee").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_duplicate_fails_on_corrupt_file() {
        let (dir, store) = seeded_store(&[student(1, "Bob", "Ray")]).await;
        std::fs::write(dir.path().join("2.json"), "not a record").unwrap();

        let result = find_duplicate(&store, "Ann", "Lee").await;

        assert!(matches!(result, Err(RecordError::Corrupt { .. })));
    }

    // ============================================================
    // SEARCH TESTS
    // ============================================================

    #[tokio::test]
    async fn test_search_empty_store() {
        let (_dir, store) = seeded_store(&[]).await;

        let results = search(&store, &NameFilter::default()).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_filters_returns_all() {
        let records = vec![
            student(1, "Ann", "Lee"),
            student(2, "Bob", "Ray"),
            student(3, "Cid", "Moe"),
        ];
        let (_dir, store) = seeded_store(&records).await;

        let results = search(&store, &NameFilter::new(None, None)).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(ids(&results), ids(&records));
    }

    #[tokio::test]
    async fn test_search_by_first_name_prefix_only() {
        let (_dir, store) = seeded_store(&[
            student(1, "Ann", "Lee"),
            student(2, "anna", "Ray"),
            student(3, "Bob", "Annis"),
        ])
        .await;

        let results = search(&store, &NameFilter::new(Some("AN"), None))
            .await
            .unwrap();

        assert_eq!(ids(&results), HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn test_search_by_both_prefixes() {
        let (_dir, store) = seeded_store(&[
            student(1, "Ann", "Lee"),
            student(2, "Ann", "Ray"),
            student(3, "Bob", "Lee"),
        ])
        .await;

        let results = search(&store, &NameFilter::new(Some("a"), Some("le")))
            .await
            .unwrap();

        assert_eq!(ids(&results), HashSet::from([1]));
    }

    #[tokio::test]
    async fn test_search_returns_full_records() {
        let record = student(5, "Ann", "Lee");
        let (_dir, store) = seeded_store(&[record.clone()]).await;

        let results = search(&store, &NameFilter::new(Some("ann"), Some("lee")))
            .await
            .unwrap();

        assert_eq!(results, vec![record]);
    }

    #[tokio::test]
    async fn test_search_fails_on_corrupt_file() {
        let (dir, store) = seeded_store(&[student(1, "Ann", "Lee")]).await;
        std::fs::write(dir.path().join("2.json"), "").unwrap();

        let result = search(&store, &NameFilter::default()).await;

        let err = result.unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn test_cursor_visits_each_record_once() {
        let records: Vec<StudentRecord> = (1..=20)
            .map(|i| student(i, &format!("First{}", i), &format!("Last{}", i)))
            .collect();
        let (_dir, store) = seeded_store(&records).await;

        let mut cursor = RecordCursor::open(&store).await.unwrap();
        let mut seen = Vec::new();
        while let Some(record) = cursor.next_record().await.unwrap() {
            seen.push(record);
        }

        assert_eq!(seen.len(), 20);
        assert_eq!(ids(&seen), ids(&records));
    }
}
