fn main() {
    multiversx_sc_meta_lib::cli_main::<prediction_protocol::AbiProvider>();
}
