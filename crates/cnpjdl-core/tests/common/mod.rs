#![allow(dead_code)]

pub mod archive_server;
