pub mod message_builder;
pub mod record_type_map;
pub mod transport;

pub use message_builder::{MessageBuilder, DEFAULT_UDP_PAYLOAD_SIZE};
pub use record_type_map::RecordTypeMapper;
pub use transport::{TcpFrameBuffer, TcpTransport, UdpTransport};
