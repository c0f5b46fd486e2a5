fn main() -> Result<(), Box<dyn std::error::Error>> {
	if std::env::var_os("PROTOC").is_none() {
		std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
	}
	tonic_prost_build::configure()
		.build_server(true)
		.build_client(false)
		.compile_well_known_types(true)
		.extern_path(".google.protobuf.Empty", "()")
		.extern_path(".google.protobuf.Timestamp", "::prost_types::Timestamp")
		.extern_path(".google.protobuf.Struct", "::prost_types::Struct")
		.compile_protos(&["proto/ledger.proto", "proto/health.proto"], &["proto"])?;
	Ok(())
}
