pub use super::movies::Entity as Movies;
