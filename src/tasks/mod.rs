pub mod cal_button;
pub mod calibrator;
pub mod commander;
pub mod indicator;
pub mod mag_reader;
