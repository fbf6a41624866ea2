pub mod favorite;
pub mod health;
pub mod recommendation;
