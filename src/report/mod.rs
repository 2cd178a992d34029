pub mod sponge;
