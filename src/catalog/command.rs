pub mod check_availability_cmd;
pub mod get_book_cmd;
pub mod search_books_cmd;
pub mod update_availability_cmd;
pub mod update_category_cmd;
