// Commands module

pub mod generate;
pub mod ls;
pub mod put;
pub mod rm;
pub mod sign;

pub use generate::execute_gen;
pub use ls::execute_ls;
pub use put::execute_put;
pub use rm::execute_rm;
pub use sign::execute_sign;
