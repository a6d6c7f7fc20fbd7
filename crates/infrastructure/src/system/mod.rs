pub mod resolv_conf;
pub mod static_nameservers;

pub use resolv_conf::ResolvConfReader;
pub use static_nameservers::StaticNameservers;
