pub mod todo;
pub mod user;

pub use todo::{
    CreateTodoRequest, TodoItem, TodoListResponse, TodoResponse, UpdateTodoRequest,
    UploadUrlResponse,
};
pub use user::User;
