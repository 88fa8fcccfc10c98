mod assembler;
mod common;
mod resolver;
