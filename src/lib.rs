pub mod linkedlist;

pub use linkedlist::{LinkedList, Node};
