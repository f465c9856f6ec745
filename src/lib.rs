#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_meta as meta;
pub use vc_os as os;
pub use vc_utils as utils;
