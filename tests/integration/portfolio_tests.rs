use crate::common::{integration_enabled, login};
use degiroasync::prelude::*;

#[tokio::test]
async fn test_get_portfolio() {
    if !integration_enabled() {
        return;
    }
    let (client, session) = login().await;
    let portfolio = client.get_portfolio(&session).await.expect("portfolio");
    info!("Portfolio:\n{}", portfolio);
    for position in &portfolio.positions {
        assert!(!position.product.id.is_empty());
    }

    let total = client
        .get_portfolio_total(&session)
        .await
        .expect("portfolio total");
    info!("Total cash: {}", total.total_cash);
}
