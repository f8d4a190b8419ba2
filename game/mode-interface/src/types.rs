pub mod game;
pub mod id_gen;
pub mod id_types;
pub mod participant;
pub mod team;
