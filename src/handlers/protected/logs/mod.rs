// handlers/protected/logs/mod.rs - Log resource handlers
//
// Every route here sits behind the bearer middleware, so each handler can
// rely on an `AuthUser` extension. Reads are open to any authenticated user;
// writes are restricted to the log's owner.

pub mod create;  // POST /logs
pub mod delete;  // DELETE /logs/:id
pub mod list;    // GET /logs
pub mod mine;    // GET /myLogs
pub mod show;    // GET /logs/:id
pub mod update;  // PATCH /logs/:id

pub use create::log_create;
pub use delete::log_delete;
pub use list::log_list;
pub use mine::log_list_mine;
pub use show::log_show;
pub use update::log_update;
