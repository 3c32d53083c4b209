mod fakes;
mod filename;
