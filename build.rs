use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Error, Result};

const SHADER_DIR: &str = "./shaders";

fn output_file_for_shader_file(shader_file_path: &Path) -> Result<PathBuf> {
    let parent = shader_file_path.parent().with_context(|| {
        format!(
            "unable to get parent dir for shader at {:?}",
            shader_file_path
        )
    })?;
    let shader_file_name = shader_file_path
        .file_name()
        .with_context(|| {
            format!(
                "Unable to get file name for shader at path {:#?}",
                shader_file_path,
            )
        })?
        .to_str()
        .with_context(|| {
            format!(
                "Unable to get str representation of file name at path {:#?}",
                shader_file_path
            )
        })?;
    let output_file_name = format!("{}.spv", shader_file_name);
    Ok(parent.join(Path::new(&output_file_name)))
}

fn needs_rebuild(shader_file_path: &Path, output_path: &Path) -> Result<bool> {
    if !output_path.try_exists()? {
        return Ok(true);
    }

    let shader_last_modified_time =
        std::fs::metadata(shader_file_path)?.modified()?;
    let output_last_modified_time =
        std::fs::metadata(output_path)?.modified()?;

    Ok(shader_last_modified_time > output_last_modified_time)
}

fn compile_shader(shader_file_path: &Path) -> Result<()> {
    let shader_path_str = shader_file_path
        .to_str()
        .context("shader path is not valid unicode")?;
    println!("cargo:rerun-if-changed={}", shader_path_str);

    let output_path = output_file_for_shader_file(shader_file_path)?;
    if !needs_rebuild(shader_file_path, &output_path).unwrap_or(true) {
        return Ok(());
    }

    // The demos load SPIR-V at runtime, so a missing compiler only matters
    // when one of them is launched.
    let output = match Command::new("glslc")
        .arg(shader_path_str)
        .arg("-o")
        .arg(&output_path)
        .arg("--target-env=vulkan1.1")
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            println!(
                "cargo:warning=glslc unavailable, skipping {} ({})",
                shader_path_str, err
            );
            return Ok(());
        }
    };

    if !output.status.success() {
        eprintln!("{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        return Err(Error::msg(format!(
            "Error running glslc for shader at {:#?}",
            shader_file_path,
        )));
    }

    println!("cargo:warning={} -> {:?}", shader_path_str, output_path);
    Ok(())
}

fn main() -> Result<()> {
    let all_paths = glob::glob(&format!("{}/**/*.vert", SHADER_DIR))?
        .chain(glob::glob(&format!("{}/**/*.frag", SHADER_DIR))?);
    for path_entry in all_paths {
        compile_shader(path_entry?.as_path())?;
    }

    Ok(())
}
