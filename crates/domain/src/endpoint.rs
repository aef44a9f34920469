//! Fixed controller endpoint paths.

pub const DATA: &str = "/api/data";
pub const ADD_PLANT: &str = "/api/add-plant";
pub const WATER: &str = "/api/water";
pub const DELETE_PLANT: &str = "/api/delete-plant";
pub const UPDATE_CONFIG: &str = "/api/update-config";
pub const SAVE_WIFI: &str = "/api/save-wifi";
pub const REBOOT: &str = "/api/reboot";
pub const SCAN: &str = "/api/scan";
pub const DETECT_SENSOR: &str = "/api/detect-sensor";
