#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]

fn main() -> anyhow::Result<()> {
    let options = <avmap_client::Options as clap::Parser>::parse();
    avmap_client::run(options)
}
