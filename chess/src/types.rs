pub use sanchess_base::types::*;
