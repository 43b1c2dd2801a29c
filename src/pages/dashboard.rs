//! Dashboard: balance, summary, weekly activity and recent items

use chrono::{DateTime, Utc};

use super::state::{fetch, resolve, FallbackPolicy, PageError, PageState};
use crate::analytics::{daily_activity, newest_first, ActivityTotals, DayBucket, TransactionSummary};
use crate::client::ApiClient;
use crate::inbox::NotificationInbox;
use crate::lifecycle::PageScope;
use crate::model::{Id, Notification, SendMoneyRequest, Transaction, User, Wallet};
use crate::placeholder::Placeholder;
use crate::validation::{validate_amount, validate_send};

/// Rows in the "recent transactions" card
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub user: User,
    pub wallet: Wallet,
    pub transactions: Vec<Transaction>,
    pub notifications: NotificationInbox,
    pub summary: TransactionSummary,
    pub activity: Vec<DayBucket>,
    pub totals: ActivityTotals,
}

impl DashboardView {
    pub fn build(
        user: User,
        wallet: Wallet,
        transactions: Vec<Transaction>,
        notifications: Vec<Notification>,
        activity_days: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let summary = TransactionSummary::compute(&transactions, user.id);
        let activity = daily_activity(&transactions, user.id, activity_days, now.date_naive());
        let totals = ActivityTotals::from_buckets(&activity);

        Self {
            summary,
            totals,
            activity,
            notifications: NotificationInbox::new(notifications),
            transactions,
            wallet,
            user,
        }
    }

    /// Newest few transactions
    pub fn recent(&self) -> Vec<&Transaction> {
        newest_first(&self.transactions)
            .into_iter()
            .take(RECENT_LIMIT)
            .collect()
    }

    fn placeholder(gen: &mut Placeholder, viewer: Id, activity_days: usize) -> Self {
        let now = Utc::now();
        let user = gen.user(viewer);
        let wallet = gen.wallet(viewer);
        let transactions = gen.transactions(viewer, 20);
        let notifications = gen.notifications(viewer, 5);
        Self::build(user, wallet, transactions, notifications, activity_days, now)
    }
}

pub struct DashboardPage {
    policy: FallbackPolicy,
    activity_days: usize,
    pub state: PageState<DashboardView>,
}

impl DashboardPage {
    pub fn new(policy: FallbackPolicy, activity_days: usize) -> Self {
        Self {
            policy,
            activity_days,
            state: PageState::Loading,
        }
    }

    /// Current user first, then wallet, transactions and notifications together
    pub async fn load(&mut self, client: &ApiClient, scope: &PageScope) -> &PageState<DashboardView> {
        let viewer = match client.viewer() {
            Ok(viewer) => viewer,
            Err(_) => {
                self.state = PageState::Error(PageError::Unauthenticated);
                return &self.state;
            }
        };

        self.state = PageState::Loading;
        let result = self.fetch_view(client, scope).await;
        let days = self.activity_days;
        self.state = resolve(result, self.policy, |gen| {
            DashboardView::placeholder(gen, viewer, days)
        });
        &self.state
    }

    async fn fetch_view(&self, client: &ApiClient, scope: &PageScope) -> Result<DashboardView, PageError> {
        let user = fetch(scope, client.me()).await?;

        let (wallet, transactions, notifications) = tokio::join!(
            fetch(scope, client.get_or_create_wallet(user.id)),
            fetch(scope, client.get_user_transactions(user.id)),
            fetch(scope, client.get_user_notifications(user.id)),
        );

        Ok(DashboardView::build(
            user,
            wallet?,
            transactions?,
            notifications?,
            self.activity_days,
            Utc::now(),
        ))
    }

    /// Top up the signed-in user's wallet
    pub async fn add_money(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        amount: f64,
    ) -> Result<Wallet, PageError> {
        let viewer = client.viewer()?;
        let amount = validate_amount(amount)?;

        let wallet = fetch(scope, client.add_money(viewer, amount)).await?;
        self.load(client, scope).await;
        Ok(wallet)
    }

    /// Validate, look the recipient up by email, send, then refresh
    pub async fn send_money(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        recipient_email: &str,
        amount: f64,
        note: Option<&str>,
    ) -> Result<Transaction, PageError> {
        let session = client.session().ok_or(PageError::Unauthenticated)?;
        let (email, amount) = validate_send(recipient_email, amount, &session.email)?;

        let recipient = fetch(scope, client.find_user_by_email(&email))
            .await?
            .ok_or_else(|| PageError::Failed(format!("No user found with email {}", email)))?;

        let request = SendMoneyRequest {
            sender_id: session.user_id,
            recipient_id: recipient.id,
            amount,
            description: note
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        };
        let tx = fetch(scope, client.send_money(&request)).await?;
        tracing::info!("Sent {} to user {}", amount, recipient.id);

        self.load(client, scope).await;
        Ok(tx)
    }

    /// Optimistically mark a notification read; undone if the server refuses
    pub async fn mark_notification_read(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        id: Id,
    ) -> Result<(), PageError> {
        let view = self.state.require_mut()?;
        let Some(ticket) = view.notifications.mark_read(id) else {
            return Ok(());
        };

        match fetch(scope, client.mark_as_read(id)).await {
            Ok(()) => {
                view.notifications.confirm(&ticket);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Mark-read for notification {} failed: {}", id, e);
                view.notifications.rollback(&ticket);
                Err(e)
            }
        }
    }
}
