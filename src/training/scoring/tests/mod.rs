mod common;
mod explain;
