// Application layer: the pages of the resume builder, written against the domain ports.

pub mod ats_check;
pub mod chat;
pub mod editor;
pub mod export;
pub mod preview;
pub mod routes;
