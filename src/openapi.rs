use utoipa::OpenApi;

use crate::{
    book::{Book, BookUpdate},
    route::books::{
        create_book::{self, CreateBookResponse},
        delete_book::{self, DeleteBookResponse},
        get_book::{self, GetBookResponse},
        list_books::{self, ListBooksResponse},
        update_book::{self, UpdateBookResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Book API", description = "CRUD over a single books resource"),
    paths(
        list_books::list_books,
        get_book::get_book,
        create_book::create_book,
        update_book::update_book,
        delete_book::delete_book,
    ),
    components(schemas(
        Book,
        BookUpdate,
        ListBooksResponse,
        GetBookResponse,
        CreateBookResponse,
        UpdateBookResponse,
        DeleteBookResponse,
    )),
    tags((name = "books", description = "Book management"))
)]
pub struct ApiDoc;
