mod ledger;
mod money;
mod reconcile;
mod stock;
mod transaction;

pub use ledger::*;
pub use money::*;
pub use reconcile::*;
pub use stock::*;
pub use transaction::*;
