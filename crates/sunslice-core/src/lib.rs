pub mod builder;
pub mod consts;
pub mod coords;
pub mod distance;
pub mod error;
pub mod frame;
pub mod io;
pub mod path;
pub mod pipeline;
pub mod process;
pub mod projection;
pub mod sample;
pub mod slice;
