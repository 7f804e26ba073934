pub mod money;
pub mod order_query;
pub mod order_status;
pub mod phone_number;
pub mod promotion;
pub mod rating;
pub mod user_email;

pub use order_query::{OrderFilters, OrderListQuery, Page, SortBy, SortOrder};
pub use order_status::{OrderStatus, OrderType};
pub use promotion::{DiscountType, PromotionValidation};
pub use rating::Rating;
