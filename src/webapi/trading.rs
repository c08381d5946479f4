use crate::application::auth::Session;
use crate::error::AppError;
use crate::model::requests::OrderRequest;
use crate::model::utils::{format_reporting_date, join_url, with_jsessionid};
use crate::webapi::WebApi;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

impl WebApi {
    /// Calls `{tradingUrl}v5/update/{intAccount}` with arbitrary sections
    ///
    /// Known sections, each requested with a value of `0`: `portfolio`,
    /// `totalPortfolio`, `orders`, `historicalOrders` and `transactions`.
    pub async fn get_trading_update(
        &self,
        session: &Session,
        params: &[(&str, i64)],
    ) -> Result<Value, AppError> {
        let url = join_url(&[
            &session.config().trading_url,
            "v5/update",
            &session.int_account().to_string(),
        ]);
        let url = with_jsessionid(&url, session.jsessionid());
        let query: Vec<(&str, String)> = params
            .iter()
            .map(|(name, value)| (*name, value.to_string()))
            .collect();
        debug!("Trading update sections: {:?}", params);
        self.http()
            .get_json(&url, Some(session.jsessionid()), &query)
            .await
    }

    /// Current positions and cash rows
    pub async fn get_portfolio(&self, session: &Session) -> Result<Value, AppError> {
        self.get_trading_update(session, &[("portfolio", 0)]).await
    }

    /// Aggregate values of the account
    pub async fn get_portfolio_total(&self, session: &Session) -> Result<Value, AppError> {
        self.get_trading_update(session, &[("totalPortfolio", 0)])
            .await
    }

    /// Current orders, closed orders of the day and transactions
    pub async fn get_orders(&self, session: &Session) -> Result<Value, AppError> {
        self.get_trading_update(
            session,
            &[("orders", 0), ("historicalOrders", 0), ("transactions", 0)],
        )
        .await
    }

    /// Order history report between two dates, both included
    pub async fn get_orders_history(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Value, AppError> {
        let url = join_url(&[&session.config().reporting_url, "v4/order-history"]);
        let mut query = vec![
            ("fromDate", format_reporting_date(from)),
            ("toDate", format_reporting_date(to)),
        ];
        query.extend(session.account_query());
        self.http()
            .get_json(&url, Some(session.jsessionid()), &query)
            .await
    }

    /// Transactions report between two dates, both included
    pub async fn get_transactions(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Value, AppError> {
        let url = join_url(&[&session.config().reporting_url, "v4/transactions"]);
        let mut query = vec![
            ("fromDate", format_reporting_date(from)),
            ("toDate", format_reporting_date(to)),
            ("groupTransactionsByOrder", "false".to_string()),
        ];
        query.extend(session.account_query());
        self.http()
            .get_json(&url, Some(session.jsessionid()), &query)
            .await
    }

    /// Checks an order and returns its confirmation identifier and fees
    ///
    /// The order is not validated here, see [`OrderRequest::validate`].
    pub async fn check_order(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<Value, AppError> {
        let url = join_url(&[&session.config().trading_url, "v5/checkOrder"]);
        let url = with_jsessionid(&url, session.jsessionid());
        debug!("Checking order {}", order);
        self.http()
            .post_json(
                &url,
                Some(session.jsessionid()),
                &session.account_query(),
                &order.to_body(),
            )
            .await
    }

    /// Places an order previously checked with [`WebApi::check_order`]
    pub async fn confirm_order(
        &self,
        session: &Session,
        confirmation_id: &str,
        order: &OrderRequest,
    ) -> Result<Value, AppError> {
        let url = join_url(&[&session.config().trading_url, "v5/order", confirmation_id]);
        let url = with_jsessionid(&url, session.jsessionid());
        debug!("Confirming order {}", order);
        self.http()
            .post_json(
                &url,
                Some(session.jsessionid()),
                &session.account_query(),
                &order.to_body(),
            )
            .await
    }
}
