pub mod heading;
