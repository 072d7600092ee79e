pub mod dashboard;
pub mod simulate;
pub mod sockets;
