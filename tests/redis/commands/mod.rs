mod get;
mod lpop;
mod lrange;
