use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // VERGEN_GIT_SHA ends up in the GitHub user agent.
    vergen_gitcl::Emitter::default()
        .add_instructions(
            &vergen_gitcl::GitclBuilder::default()
                .sha(true)
                .build()?,
        )?
        .emit()?;
    Ok(())
}
