pub mod cli;
pub mod conf;
pub mod distribute;
pub mod enrichment;
pub mod grouping;
pub mod io;
pub mod line;
pub mod literal;
pub mod logging;
pub mod reassemble;
pub mod record;
pub mod stats;
