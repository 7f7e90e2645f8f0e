mod collections;
mod pointers;
mod scalars;
mod sequences;
