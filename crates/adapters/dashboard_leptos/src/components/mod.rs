mod modals;
mod stat_card;
mod toast;

pub use modals::{AddPlantModal, WifiModal};
pub use stat_card::StatCard;
pub use toast::{ToastContainer, ToastProvider, use_toasts};
