pub mod channel;
pub mod codec;
pub mod node;
pub mod scenario;
pub mod sim;
pub mod trace;

#[cfg(test)]
mod test;
