/// Default base URL of the web trader
pub const DEFAULT_BASE_URL: &str = "https://trader.degiro.nl";
/// Default charting endpoint serving price series
pub const DEFAULT_CHARTING_URL: &str = "https://charting.vwdservices.com/hchart/v1/deGiro/data.js";
/// Login path, relative to the base URL
pub const LOGIN_PATH: &str = "login/secure/login";
/// Second-factor login path, relative to the base URL
pub const LOGIN_TOTP_PATH: &str = "login/secure/login/totp";
/// Session configuration path, relative to the base URL
pub const CONFIG_PATH: &str = "login/secure/config";
/// Account information path, relative to the base URL
pub const ACCOUNT_INFO_PATH: &str = "trading/secure/v5/account/info";
/// Company profile path, relative to the base URL
pub const COMPANY_PROFILE_PATH: &str = "dgtbxdsservice/company-profile/v2";

/// Name of the session cookie set by the login endpoint
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Login `status` value when the credentials were accepted
pub const LOGIN_STATUS_SUCCESS: i64 = 0;
/// Login `status` value when username or password were rejected
pub const LOGIN_STATUS_BAD_CREDENTIALS: i64 = 3;
/// Login `status` value when the account requires a one-time password
pub const LOGIN_STATUS_TOTP_NEEDED: i64 = 6;

/// User agent string sent with every request
pub const USER_AGENT: &str = concat!("degiroasync/", env!("CARGO_PKG_VERSION"));

/// Default timeout in seconds for REST requests
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Default maximum number of requests per rate limiting period
pub const DEFAULT_MAX_REQUESTS: u32 = 10;
/// Default rate limiting period in seconds
pub const DEFAULT_PERIOD_SECONDS: u64 = 1;
/// Default burst size of the rate limiter
pub const DEFAULT_BURST_SIZE: u32 = 10;

/// Maximum number of product ids sent in a single products info request
pub const PRODUCTS_INFO_BATCH_SIZE: usize = 50;
/// Default page size of product searches
pub const DEFAULT_SEARCH_LIMIT: usize = 100;
/// Default maximum number of pages fetched by a product search
pub const DEFAULT_SEARCH_MAX_PAGES: usize = 10;

/// Date format expected by the reporting endpoints
pub const REPORTING_DATE_FORMAT: &str = "%d/%m/%Y";
/// Culture sent to the charting endpoint
pub const DEFAULT_CULTURE: &str = "fr-FR";

/// Time step of the one-time password algorithm, in seconds
pub const TOTP_STEP_SECONDS: u64 = 30;
/// Number of digits of a one-time password
pub const TOTP_DIGITS: usize = 6;
