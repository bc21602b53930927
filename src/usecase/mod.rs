pub mod current_user_usecase;
pub mod register_user_usecase;
