//! End-to-end tests for the tracker services
//!
//! Wires registration, background ingestion, and the aggregate views
//! together over the in-memory repositories and a mocked GitHub source.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task::JoinHandle;

    use crate::app::{
        AggregationService, IngestionQueue, IngestionService, MonthRegistry, UserService,
    };
    use crate::domain::entities::{NewUser, TrackedMonths};
    use crate::test_utils::{
        fetched_pr, InMemoryMonthRepository, InMemoryPullRequestRepository,
        InMemoryUserRepository, MockPullRequestSource,
    };

    type Aggregation = AggregationService<
        InMemoryUserRepository,
        InMemoryMonthRepository,
        InMemoryPullRequestRepository,
    >;

    struct App {
        users: UserService<InMemoryUserRepository>,
        views: Aggregation,
        months: Arc<InMemoryMonthRepository>,
        worker: JoinHandle<()>,
    }

    impl App {
        fn new(source: MockPullRequestSource, tracked: TrackedMonths) -> Self {
            let user_repo = Arc::new(InMemoryUserRepository::new());
            let months = Arc::new(InMemoryMonthRepository::new());
            let prs = Arc::new(InMemoryPullRequestRepository::new(months.clone()));
            let registry = Arc::new(MonthRegistry::new(months.clone()));

            let ingestion = Arc::new(IngestionService::new(
                Arc::new(source),
                registry.clone(),
                prs.clone(),
            ));
            let (queue, worker) = IngestionQueue::start(ingestion, tracked.clone(), 16);

            Self {
                users: UserService::new(user_repo.clone(), queue),
                views: AggregationService::new(user_repo, registry, prs, tracked),
                months,
                worker,
            }
        }

        async fn register(&self, name: &str, handle: &str) {
            self.users
                .register(&NewUser {
                    name: name.to_string(),
                    github_user: handle.to_string(),
                })
                .await
                .unwrap();
        }

        /// Close the queue and wait for every queued ingestion to finish
        async fn settle(self) -> (Aggregation, Arc<InMemoryMonthRepository>) {
            drop(self.users);
            self.worker.await.unwrap();
            (self.views, self.months)
        }
    }

    #[tokio::test]
    async fn registered_user_shows_up_in_every_view() {
        let source = MockPullRequestSource::new().with_prs(
            "alice",
            "2025-10",
            vec![fetched_pr("Add docs", "closed"), fetched_pr("WIP", "open")],
        );
        let app = App::new(source, TrackedMonths::default());

        app.register("Alice", "alice").await;
        let (views, _) = app.settle().await;

        let leaderboard = views.leaderboard().await.unwrap();
        assert_eq!(leaderboard.len(), 1);
        assert_eq!(leaderboard[0].github_user, "alice");
        assert_eq!(leaderboard[0].pr_count, 2);

        let dashboard = views.dashboard().await.unwrap();
        assert_eq!(dashboard.len(), 1);
        assert_eq!(dashboard[0].name, "Alice");
        assert_eq!(dashboard[0].prs.len(), 2);

        let lookup = views
            .lookup(&["alice".to_string(), "ghost".to_string()], "2025-10")
            .await;
        let merged: Vec<bool> = lookup[0]
            .prs
            .as_ref()
            .unwrap()
            .iter()
            .map(|d| d.pr.merged)
            .collect();
        assert_eq!(merged, vec![true, false]);
        assert_eq!(lookup[1].username, "ghost");
        assert!(lookup[1].prs.is_none());
    }

    #[tokio::test]
    async fn github_outage_still_registers_user() {
        let app = App::new(MockPullRequestSource::failing(), TrackedMonths::default());

        app.register("Bob", "bob").await;
        let (views, months) = app.settle().await;

        let leaderboard = views.leaderboard().await.unwrap();
        assert_eq!(leaderboard.len(), 1);
        assert_eq!(leaderboard[0].pr_count, 0);

        // A failed fetch skips the month entirely, so nothing was registered
        assert_eq!(months.count(), 0);
        let lookup = views.lookup(&["bob".to_string()], "2025-09").await;
        assert!(lookup[0].prs.is_none());
    }

    #[tokio::test]
    async fn leaderboard_ranks_users_and_ignores_untracked_months() {
        let source = MockPullRequestSource::new()
            .with_prs("alice", "2025-09", vec![fetched_pr("One", "open")])
            .with_prs(
                "bob",
                "2025-09",
                vec![fetched_pr("Two", "closed"), fetched_pr("Three", "open")],
            )
            .with_prs("carol", "2025-09", vec![fetched_pr("Four", "open")])
            .with_prs(
                "carol",
                "2025-10",
                vec![fetched_pr("Five", "open"), fetched_pr("Six", "open")],
            );
        let tracked = TrackedMonths::new(["2025-09"]).unwrap();
        let app = App::new(source, tracked);

        app.register("Alice", "alice").await;
        app.register("Bob", "bob").await;
        app.register("Carol", "carol").await;
        let (views, _) = app.settle().await;

        let ranking: Vec<(String, usize)> = views
            .leaderboard()
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.github_user, e.pr_count))
            .collect();
        assert_eq!(
            ranking,
            vec![
                ("bob".to_string(), 2),
                ("alice".to_string(), 1),
                ("carol".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_without_reingesting() {
        let source = MockPullRequestSource::new().with_prs(
            "alice",
            "2025-09",
            vec![fetched_pr("Add docs", "closed")],
        );
        let app = App::new(source, TrackedMonths::default());

        app.register("Alice", "alice").await;
        let second = app
            .users
            .register(&NewUser {
                name: "Other Alice".to_string(),
                github_user: " alice ".to_string(),
            })
            .await;
        assert!(second.is_err());

        let (views, _) = app.settle().await;
        let leaderboard = views.leaderboard().await.unwrap();
        assert_eq!(leaderboard.len(), 1);
        assert_eq!(leaderboard[0].pr_count, 1);
    }
}
