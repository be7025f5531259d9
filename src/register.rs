//! CLRC663 register map, command set and ISO14443A command bytes
#![allow(dead_code)]

// CLRC663 commands
pub(crate) const CMD_IDLE: u8 = 0x00;
pub(crate) const CMD_LPCD: u8 = 0x01;
pub(crate) const CMD_LOADKEY: u8 = 0x02;
pub(crate) const CMD_MFAUTHENT: u8 = 0x03;
pub(crate) const CMD_ACKREQ: u8 = 0x04;
pub(crate) const CMD_RECEIVE: u8 = 0x05;
pub(crate) const CMD_TRANSMIT: u8 = 0x06;
pub(crate) const CMD_TRANSCEIVE: u8 = 0x07;
pub(crate) const CMD_WRITEE2: u8 = 0x08;
pub(crate) const CMD_WRITEE2PAGE: u8 = 0x09;
pub(crate) const CMD_READE2: u8 = 0x0A;
pub(crate) const CMD_LOADREG: u8 = 0x0C;
pub(crate) const CMD_LOADPROTOCOL: u8 = 0x0D;
pub(crate) const CMD_LOADKEYE2: u8 = 0x0E;
pub(crate) const CMD_STOREKEYE2: u8 = 0x0F;
pub(crate) const CMD_SOFTRESET: u8 = 0x1F;

// CLRC663 registers
pub(crate) const REG_COMMAND: u8 = 0x00;
pub(crate) const REG_HOST_CTRL: u8 = 0x01;
pub(crate) const REG_FIFO_CONTROL: u8 = 0x02;
pub(crate) const REG_WATER_LEVEL: u8 = 0x03;
pub(crate) const REG_FIFO_LENGTH: u8 = 0x04;
pub(crate) const REG_FIFO_DATA: u8 = 0x05;
pub(crate) const REG_IRQ0: u8 = 0x06;
pub(crate) const REG_IRQ1: u8 = 0x07;
pub(crate) const REG_IRQ0EN: u8 = 0x08;
pub(crate) const REG_IRQ1EN: u8 = 0x09;
pub(crate) const REG_ERROR: u8 = 0x0A;
pub(crate) const REG_STATUS: u8 = 0x0B;
pub(crate) const REG_RX_BIT_CTRL: u8 = 0x0C;
pub(crate) const REG_RX_COLL: u8 = 0x0D;
pub(crate) const REG_VERSION: u8 = 0x7F;

// ISO14443A commands
pub(crate) const ISO14443A_CMD_REQA: u8 = 0x26;
pub(crate) const ISO14443A_CMD_WUPA: u8 = 0x52;
pub(crate) const ISO14443A_CMD_SELECT_CL1: u8 = 0x93;
pub(crate) const ISO14443A_CMD_SELECT_CL2: u8 = 0x95;
pub(crate) const ISO14443A_CMD_SELECT_CL3: u8 = 0x97;

/// Read flag for SPI framing: `0x80 | register` selects a register read
pub(crate) const SPI_READ_FLAG: u8 = 0x80;
