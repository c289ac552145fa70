//! Vending machine domain module (event-sourced).
//!
//! This crate contains the machine's business rules: coin acceptance, credit
//! accounting, the purchase transaction, and change dispensing, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod machine;

pub use machine::{
    AddInventory, CoinAccepted, CoinRejected, CoinsReturned, IDLE_MESSAGE, InsertCoin,
    MachineCommand, MachineEvent, MachineState, ProductVended, ReturnCoins, StockAdded, Vend,
    VendingMachine,
};
