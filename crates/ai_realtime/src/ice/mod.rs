//! ICE credential vendors

mod xirsys;

pub use xirsys::{XIRSYS_VENDOR, XirsysIceProvider, parse_ice_servers};
