pub mod overview;


pub use overview::AdminOverview;
