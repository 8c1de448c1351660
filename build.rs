use std::{env, path::PathBuf, process::Command};

fn main() {
    println!("cargo::rustc-check-cfg=cfg(jetson_cuda)");
    println!("cargo:rerun-if-changed=src/cuda");

    let target = std::env::var("TARGET").unwrap();

    if !target.contains("aarch64-unknown-linux") {
        println!("cargo:warning=Building without CUDA block matcher (not on Jetson)");
        return;
    }

    println!("cargo:rustc-cfg=jetson_cuda");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    //
    // ---- Jetson Orin Nano architecture ----
    //
    let arch = "compute_87";
    let code = "sm_87";

    //
    // ---- Compile each .cu file into PTX ----
    //
    let kernels = ["src/cuda/kernels/stereo_bm_sad.cu"];

    for kernel in kernels {
        let kpath = PathBuf::from(kernel);
        let name = kpath.file_stem().unwrap().to_str().unwrap();
        let ptx_file = out_dir.join(format!("{name}.ptx"));

        println!("cargo:warning=Compiling {kernel} → {name}.ptx");

        let status = Command::new("nvcc")
            .arg("-ptx")
            .arg("-o")
            .arg(&ptx_file)
            .arg(&kpath)
            .arg(format!("-arch={}", arch))
            .arg(format!("-code={}", code))
            .status()
            .expect("Failed to run nvcc");

        assert!(status.success(), "Failed to compile {kernel} to PTX");
    }
}
