//! Library crate for trivia-rpg, shared by the proxy server and the terminal client.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod game;
pub mod routes;
pub mod services;
pub mod state;
