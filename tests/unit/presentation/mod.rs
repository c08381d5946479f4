mod test_portfolio;
mod test_price;
