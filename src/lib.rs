/*!
# `srch` Library

Finds values in JSON documents by the tail of their field path and by a
regex or numeric range over the value.
*/

pub mod commands;
pub mod output;
pub mod query;
