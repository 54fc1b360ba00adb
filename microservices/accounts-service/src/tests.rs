//! Unit tests for the account query service

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bankline_core::Account;
    use bankline_store::{AccountStore, InMemoryAccountStore, StoreError};
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::{AccountsService, Error};

    fn account(id: i64, number: &str, owner: &str) -> Account {
        Account::new(id, number, owner, Decimal::new(id * 1000, 2))
    }

    fn service_over(accounts: Vec<Account>) -> AccountsService {
        AccountsService::new(Arc::new(InMemoryAccountStore::new(accounts).unwrap()))
    }

    /// Counts queries and fails every one of them
    #[derive(Default)]
    struct BrokenStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AccountStore for BrokenStore {
        async fn find_exact(&self, _number: &str) -> bankline_store::Result<Option<Account>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Pool("connection refused".into()))
        }

        async fn find_by_owner_contains(&self, _fragment: &str) -> bankline_store::Result<Vec<Account>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Pool("connection refused".into()))
        }

        async fn count(&self) -> bankline_store::Result<u64> {
            Err(StoreError::Pool("connection refused".into()))
        }

        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_lookup_by_number_returns_stored_account() {
        let alice = account(1, "123456789", "Alice");
        let service = service_over(vec![alice.clone()]);

        let found = service.by_number("123456789").await.unwrap();
        assert_eq!(found, alice);
    }

    #[tokio::test]
    async fn test_every_stored_account_is_found_by_its_number() {
        let accounts = vec![
            account(1, "123456001", "Keri Lee"),
            account(2, "123456002", "Dollie Schwartz"),
            account(3, "123456003", "Cornelia J. Andresen"),
        ];
        let service = service_over(accounts.clone());

        for expected in accounts {
            assert_eq!(service.by_number(&expected.number).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_empty_store_reports_not_found() {
        let service = service_over(vec![]);

        let err = service.by_number("000000000").await.unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(ref id) if id == "000000000"));
    }

    #[tokio::test]
    async fn test_malformed_number_is_just_not_found() {
        let service = service_over(vec![account(1, "123456789", "Alice")]);

        for number in ["12345", "abcdefghi", "1234567890"] {
            let err = service.by_number(number).await.unwrap_err();
            assert!(matches!(err, Error::AccountNotFound(ref id) if id == number));
        }
    }

    #[tokio::test]
    async fn test_owner_lookup_keeps_store_order() {
        let service = service_over(vec![
            account(1, "123456001", "Alice"),
            account(2, "123456002", "Alicia"),
            account(3, "123456003", "Bob"),
        ]);

        let owners: Vec<String> = service
            .by_owner("ali")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.owner)
            .collect();
        assert_eq!(owners, vec!["Alice", "Alicia"]);
    }

    #[tokio::test]
    async fn test_owner_lookup_is_not_sorted_alphabetically() {
        let service = service_over(vec![
            account(1, "123456001", "Zara Ali"),
            account(2, "123456002", "Alice"),
        ]);

        let numbers: Vec<String> = service
            .by_owner("ali")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.number)
            .collect();
        assert_eq!(numbers, vec!["123456001", "123456002"]);
    }

    #[tokio::test]
    async fn test_owner_lookup_ignores_case() {
        let service = service_over(vec![account(1, "123456789", "Alice")]);

        for fragment in ["a", "A", "ALI", "lic"] {
            let found = service.by_owner(fragment).await.unwrap();
            assert_eq!(found.len(), 1, "fragment {fragment}");
        }
    }

    #[tokio::test]
    async fn test_owner_lookup_returns_exactly_the_matches() {
        let service = service_over(vec![
            account(1, "123456001", "Mark"),
            account(2, "123456002", "Bob"),
            account(3, "123456003", "Alice"),
            account(4, "123456004", "Kim"),
        ]);

        let numbers: Vec<String> = service
            .by_owner("a")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.number)
            .collect();
        assert_eq!(numbers, vec!["123456001", "123456003"]);
    }

    #[tokio::test]
    async fn test_no_owner_match_is_not_found() {
        let service = service_over(vec![account(1, "123456789", "Alice")]);

        let err = service.by_owner("zzz").await.unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(ref id) if id == "zzz"));
    }

    #[tokio::test]
    async fn test_empty_fragment_is_not_found() {
        let service = service_over(vec![account(1, "123456789", "Alice")]);

        let err = service.by_owner("").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_not_found() {
        let store = Arc::new(BrokenStore::default());
        let service = AccountsService::new(store.clone());

        let err = service.by_number("123456789").await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));

        let err = service.by_owner("ali").await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));

        // One query per lookup, no retries
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
        assert!(!service.store_healthy().await);
    }

    #[tokio::test]
    async fn test_metrics_track_lookups() {
        let service = service_over(vec![account(1, "123456789", "Alice")]);

        service.by_number("123456789").await.unwrap();
        service.by_number("000000000").await.unwrap_err();
        service.by_owner("ali").await.unwrap();

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.by_number, 2);
        assert_eq!(snapshot.by_owner, 1);
        assert_eq!(snapshot.not_found, 1);
        assert_eq!(snapshot.store_errors, 0);
        assert_eq!(snapshot.latency_ms.samples, 3);
    }
}
