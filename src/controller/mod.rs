//! The form/request/render cycle. One controller per resource, one
//! async method per button; all effects land on the controller's own
//! form, flash and results state, never anywhere else.

mod item;
mod order;
mod sequence;

pub use item::ItemController;
pub use order::OrderController;

/// Flash strings shown by the controllers. These are part of the
/// observable contract and match the admin page byte for byte.
pub const FLASH_SUCCESS: &str = "Success";
pub const FLASH_SERVER_ERROR: &str = "Server error!";
pub const FLASH_ORDER_DELETED: &str = "Order has been Deleted!";
pub const FLASH_ITEM_DELETED: &str = "Item has been Deleted!";
pub const FLASH_ORDER_CANCELLED: &str = "Order cancellation successful";
pub const FLASH_ORDER_ID_REQUIRED: &str = "Please enter an Order ID";
